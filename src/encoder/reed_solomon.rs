//! Reed-Solomon coding over GF(256)

/// GF(256) arithmetic, primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
///
/// Log/exp tables are built at compile time and shared read-only.
pub struct Gf256;

const PRIMITIVE_POLY: u16 = 0x11D;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    // α^255 = 1 closes the cycle
    exp[255] = 1;
    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();
static EXP_TABLE: [u8; 256] = TABLES.0;
static LOG_TABLE: [u8; 256] = TABLES.1;

impl Gf256 {
    /// α^n
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }

    /// Discrete log of a non-zero element
    pub fn log(a: u8) -> usize {
        debug_assert!(a != 0, "log of zero");
        LOG_TABLE[a as usize] as usize
    }

    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    pub fn div(a: u8, b: u8) -> u8 {
        if b == 0 {
            panic!("Division by zero");
        }
        if a == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + 255 - log_b) % 255]
    }

    pub fn pow(a: u8, n: usize) -> u8 {
        if n == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        EXP_TABLE[(log_a * (n % 255)) % 255]
    }

    /// Multiplicative inverse of a non-zero element
    pub fn inv(a: u8) -> u8 {
        Self::div(1, a)
    }
}

/// Reed-Solomon encoder producing `degree` EC codewords per block
#[derive(Debug, Clone)]
pub struct ReedSolomonEncoder {
    // Generator coefficients, highest degree first, monic term dropped
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Build the generator ∏ (x − α^i) for i in 0..degree
    pub fn new(degree: usize) -> Self {
        let mut poly = vec![1u8];
        for i in 0..degree {
            let root = Gf256::exp(i);
            let mut next = vec![0u8; poly.len() + 1];
            for (j, &coef) in poly.iter().enumerate() {
                next[j] ^= coef;
                next[j + 1] ^= Gf256::mul(coef, root);
            }
            poly = next;
        }
        poly.remove(0);
        Self { generator: poly }
    }

    /// Number of EC codewords produced
    pub fn degree(&self) -> usize {
        self.generator.len()
    }

    /// Generator coefficients below the leading 1
    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    /// Remainder of data(x)·x^degree divided by the generator
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut rem = vec![0u8; self.degree()];
        if rem.is_empty() {
            return rem;
        }
        for &byte in data {
            let factor = byte ^ rem[0];
            rem.rotate_left(1);
            if let Some(last) = rem.last_mut() {
                *last = 0;
            }
            for (r, &g) in rem.iter_mut().zip(&self.generator) {
                *r ^= Gf256::mul(g, factor);
            }
        }
        rem
    }
}
