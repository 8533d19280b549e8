use crate::CipherSuite;

/// Appends a fixed set of extra suites to whatever the engine offers.
#[derive(Debug, Clone)]
pub struct CipherSuiteAdvertiser {
    supplementary: Vec<CipherSuite>,
}

impl CipherSuiteAdvertiser {
    pub fn new(supplementary: Vec<CipherSuite>) -> Self {
        Self { supplementary }
    }

    pub fn supplementary(&self) -> &[CipherSuite] {
        &self.supplementary
    }

    /// `base` followed by the supplementary suites. No deduplication.
    pub fn advertised_suites(&self, base: &[CipherSuite]) -> Vec<CipherSuite> {
        let mut suites = Vec::with_capacity(base.len() + self.supplementary.len());
        suites.extend_from_slice(base);
        suites.extend_from_slice(&self.supplementary);
        suites
    }
}
