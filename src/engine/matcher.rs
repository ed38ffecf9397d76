//! Target matcher - Plaintext or digest comparison
//!
//! The algorithm set is closed: anything outside [`Algorithm`] is rejected
//! when the target is built, never per candidate.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::{SearchError, SearchResult};

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Sha256,
    Sha1,
    Md5,
    Blake3,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Sha256,
        Algorithm::Sha1,
        Algorithm::Md5,
        Algorithm::Blake3,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha1 => "sha1",
            Algorithm::Md5 => "md5",
            Algorithm::Blake3 => "blake3",
        }
    }

    /// Digest size in bytes
    pub fn output_len(&self) -> usize {
        match self {
            Algorithm::Sha256 => 32,
            Algorithm::Sha1 => 20,
            Algorithm::Md5 => 16,
            Algorithm::Blake3 => 32,
        }
    }

    /// Hash `bytes`
    pub fn digest(&self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Algorithm::Sha256 => Sha256::digest(bytes).to_vec(),
            Algorithm::Sha1 => Sha1::digest(bytes).to_vec(),
            Algorithm::Md5 => Md5::digest(bytes).to_vec(),
            Algorithm::Blake3 => blake3::hash(bytes).as_bytes().to_vec(),
        }
    }

    /// Whether `bytes` hashes to `expected`, without allocating
    pub fn digest_matches(&self, bytes: &[u8], expected: &[u8]) -> bool {
        match self {
            Algorithm::Sha256 => Sha256::digest(bytes).as_slice() == expected,
            Algorithm::Sha1 => Sha1::digest(bytes).as_slice() == expected,
            Algorithm::Md5 => Md5::digest(bytes).as_slice() == expected,
            Algorithm::Blake3 => blake3::hash(bytes).as_bytes().as_slice() == expected,
        }
    }

    /// Hash `bytes` and hex-encode the result
    pub fn hex_digest(&self, bytes: &[u8]) -> String {
        hex::encode(self.digest(bytes))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Algorithm::Sha256),
            "sha1" | "sha-1" => Ok(Algorithm::Sha1),
            "md5" => Ok(Algorithm::Md5),
            "blake3" => Ok(Algorithm::Blake3),
            _ => Err(SearchError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// How a search compares candidates: plaintext or one of the digests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmChoice {
    Plain,
    Sha256,
    Sha1,
    Md5,
    Blake3,
}

impl AlgorithmChoice {
    /// The digest algorithm, `None` for plaintext comparison
    pub fn digest_algorithm(&self) -> Option<Algorithm> {
        match self {
            AlgorithmChoice::Plain => None,
            AlgorithmChoice::Sha256 => Some(Algorithm::Sha256),
            AlgorithmChoice::Sha1 => Some(Algorithm::Sha1),
            AlgorithmChoice::Md5 => Some(Algorithm::Md5),
            AlgorithmChoice::Blake3 => Some(Algorithm::Blake3),
        }
    }

    pub fn name(&self) -> &'static str {
        self.digest_algorithm().map_or("plain", |a| a.name())
    }
}

impl From<Algorithm> for AlgorithmChoice {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Sha256 => AlgorithmChoice::Sha256,
            Algorithm::Sha1 => AlgorithmChoice::Sha1,
            Algorithm::Md5 => AlgorithmChoice::Md5,
            Algorithm::Blake3 => AlgorithmChoice::Blake3,
        }
    }
}

impl fmt::Display for AlgorithmChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmChoice {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("plain") {
            return Ok(AlgorithmChoice::Plain);
        }
        s.parse::<Algorithm>().map(AlgorithmChoice::from)
    }
}

/// What the search is looking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Plain(String),
    Digest { algorithm: Algorithm, digest: Vec<u8> },
}

impl Target {
    /// Build a target from user input.
    ///
    /// For digest algorithms `value` is the hex-encoded digest; its length
    /// must match the algorithm's output size.
    pub fn parse(value: &str, algorithm: AlgorithmChoice) -> SearchResult<Self> {
        match algorithm.digest_algorithm() {
            None => Ok(Target::Plain(value.to_string())),
            Some(algorithm) => {
                let digest = hex::decode(value.trim())
                    .map_err(|e| SearchError::InvalidDigest(e.to_string()))?;
                Self::digest(algorithm, digest)
            }
        }
    }

    /// Build a digest target from raw bytes
    pub fn digest(algorithm: Algorithm, digest: Vec<u8>) -> SearchResult<Self> {
        if digest.len() != algorithm.output_len() {
            return Err(SearchError::DigestLength {
                algorithm: algorithm.name(),
                expected: algorithm.output_len(),
                actual: digest.len(),
            });
        }
        Ok(Target::Digest { algorithm, digest })
    }

    /// Digest target for a known plaintext, as the demo mode uses
    pub fn hashed(plaintext: &str, algorithm: Algorithm) -> Self {
        Target::Digest {
            algorithm,
            digest: algorithm.digest(plaintext.as_bytes()),
        }
    }

    pub fn algorithm(&self) -> AlgorithmChoice {
        match self {
            Target::Plain(_) => AlgorithmChoice::Plain,
            Target::Digest { algorithm, .. } => (*algorithm).into(),
        }
    }
}

/// Compares candidates against one target
#[derive(Debug, Clone)]
pub struct Matcher {
    target: Target,
}

impl Matcher {
    pub fn new(target: Target) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Whether `candidate` is the target (or hashes to it)
    pub fn matches(&self, candidate: &str) -> bool {
        matches(candidate, &self.target)
    }
}

/// Whether `candidate` is `target` (or hashes to it)
pub fn matches(candidate: &str, target: &Target) -> bool {
    match target {
        Target::Plain(p) => candidate == p,
        Target::Digest { algorithm, digest } => {
            algorithm.digest_matches(candidate.as_bytes(), digest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            Algorithm::Sha256.hex_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            Algorithm::Sha1.hex_digest(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            Algorithm::Md5.hex_digest(b"abc"),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            Algorithm::Blake3.hex_digest(b"abc"),
            blake3::hash(b"abc").to_hex().to_string()
        );
    }

    #[test]
    fn test_output_lengths() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.digest(b"x").len(), algorithm.output_len());
        }
    }

    #[test]
    fn test_digest_matches_agrees_with_digest() {
        for algorithm in Algorithm::ALL {
            let expected = algorithm.digest(b"cab");
            assert!(algorithm.digest_matches(b"cab", &expected));
            assert!(!algorithm.digest_matches(b"abc", &expected));
            assert!(!algorithm.digest_matches(b"cab", &expected[1..]));
        }
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("SHA256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!("md5".parse::<AlgorithmChoice>().unwrap(), AlgorithmChoice::Md5);
        assert_eq!("Plain".parse::<AlgorithmChoice>().unwrap(), AlgorithmChoice::Plain);
        assert_eq!(
            "sha512".parse::<AlgorithmChoice>(),
            Err(SearchError::UnsupportedAlgorithm("sha512".to_string()))
        );
    }

    #[test]
    fn test_plain_match() {
        let matcher = Matcher::new(Target::Plain("11".to_string()));
        assert!(matcher.matches("11"));
        assert!(!matcher.matches("10"));
        assert!(!matcher.matches("111"));
    }

    #[test]
    fn test_digest_match() {
        let hex = Algorithm::Sha256.hex_digest(b"cab");
        let target = Target::parse(&hex, AlgorithmChoice::Sha256).unwrap();
        assert_eq!(target.algorithm(), AlgorithmChoice::Sha256);

        let matcher = Matcher::new(target.clone());
        assert!(matcher.matches("cab"));
        assert!(!matcher.matches("abc"));
        assert!(matches("cab", &target));
        assert!(!matches("abc", &target));
        assert_eq!(matcher.matches("bca"), matches("bca", &target));
    }

    #[test]
    fn test_hashed_target_equals_parsed() {
        let hex = Algorithm::Md5.hex_digest(b"pw");
        assert_eq!(
            Target::hashed("pw", Algorithm::Md5),
            Target::parse(&hex, AlgorithmChoice::Md5).unwrap()
        );
    }

    #[test]
    fn test_bad_digests_rejected() {
        assert!(matches!(
            Target::parse("not-hex", AlgorithmChoice::Sha1),
            Err(SearchError::InvalidDigest(_))
        ));
        assert_eq!(
            Target::parse("abcd", AlgorithmChoice::Md5),
            Err(SearchError::DigestLength {
                algorithm: "md5",
                expected: 16,
                actual: 2
            })
        );
    }
}
