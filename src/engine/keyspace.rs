//! Keyspace - Mixed-radix mapping between indices and candidates
//!
//! An index is read as a base-`|charset|` number with `length` digits,
//! most significant digit first. Index 0 is the first charset character
//! repeated `length` times and indices follow charset order
//! lexicographically, so every worker addresses candidates by arithmetic
//! alone without materializing the space.

use crate::error::{SearchError, SearchResult};

/// All strings of one length over one charset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    charset: Vec<char>,
    length: usize,
    size: u128,
}

impl SearchSpace {
    /// Build a space, computing its size with overflow-checked arithmetic
    pub fn new(charset: &[char], length: usize) -> SearchResult<Self> {
        if charset.is_empty() {
            return Err(SearchError::EmptyCharset);
        }
        if length == 0 {
            return Err(SearchError::ZeroLength);
        }

        let overflow = SearchError::SpaceOverflow {
            charset_len: charset.len(),
            length,
        };
        let exponent = u32::try_from(length).map_err(|_| overflow.clone())?;
        let size = (charset.len() as u128)
            .checked_pow(exponent)
            .ok_or(overflow)?;

        Ok(Self {
            charset: charset.to_vec(),
            length,
            size,
        })
    }

    pub fn charset(&self) -> &[char] {
        &self.charset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of candidates: `|charset|^length`
    pub fn size(&self) -> u128 {
        self.size
    }

    /// Candidate at `index`
    pub fn decode(&self, index: u128) -> SearchResult<String> {
        let mut out = String::with_capacity(self.length);
        self.decode_into(index, &mut out)?;
        Ok(out)
    }

    /// Candidate at `index`, written into a reusable buffer
    pub fn decode_into(&self, index: u128, out: &mut String) -> SearchResult<()> {
        if index >= self.size {
            return Err(SearchError::OutOfRange {
                index,
                size: self.size,
            });
        }

        // Walk place values from radix^(length-1) down to 1
        let radix = self.charset.len() as u128;
        let mut place = self.size / radix;
        let mut rest = index;

        out.clear();
        for _ in 0..self.length {
            out.push(self.charset[(rest / place) as usize]);
            rest %= place;
            place /= radix;
        }
        Ok(())
    }

    /// Index of `candidate`; the inverse of [`SearchSpace::decode`]
    pub fn encode(&self, candidate: &str) -> SearchResult<u128> {
        let actual = candidate.chars().count();
        if actual != self.length {
            return Err(SearchError::LengthMismatch {
                expected: self.length,
                actual,
            });
        }

        let radix = self.charset.len() as u128;
        candidate.chars().try_fold(0u128, |acc, c| {
            let digit = self
                .charset
                .iter()
                .position(|&x| x == c)
                .ok_or(SearchError::CharNotInCharset(c))?;
            Ok(acc * radix + digit as u128)
        })
    }
}

/// Free-function form of [`SearchSpace::decode`]
pub fn decode(space: &SearchSpace, index: u128) -> SearchResult<String> {
    space.decode(index)
}

/// Free-function form of [`SearchSpace::encode`]
pub fn encode(space: &SearchSpace, candidate: &str) -> SearchResult<u128> {
    space.encode(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_size() {
        let space = SearchSpace::new(&chars("abc"), 3).unwrap();
        assert_eq!(space.size(), 27);

        let space = SearchSpace::new(&chars("01"), 10).unwrap();
        assert_eq!(space.size(), 1024);
    }

    #[test]
    fn test_rejects_bad_spaces() {
        assert_eq!(SearchSpace::new(&[], 3), Err(SearchError::EmptyCharset));
        assert_eq!(SearchSpace::new(&chars("ab"), 0), Err(SearchError::ZeroLength));
        assert!(matches!(
            SearchSpace::new(&chars("0123456789"), 40),
            Err(SearchError::SpaceOverflow { .. })
        ));
    }

    #[test]
    fn test_decode_order() {
        let space = SearchSpace::new(&chars("abc"), 3).unwrap();
        assert_eq!(space.decode(0).unwrap(), "aaa");
        assert_eq!(space.decode(1).unwrap(), "aab");
        assert_eq!(space.decode(3).unwrap(), "aba");
        assert_eq!(space.decode(19).unwrap(), "cab");
        assert_eq!(space.decode(26).unwrap(), "ccc");
    }

    #[test]
    fn test_decode_out_of_range() {
        let space = SearchSpace::new(&chars("01"), 2).unwrap();
        assert_eq!(
            space.decode(4),
            Err(SearchError::OutOfRange { index: 4, size: 4 })
        );
    }

    #[test]
    fn test_encode_errors() {
        let space = SearchSpace::new(&chars("abc"), 2).unwrap();
        assert_eq!(
            space.encode("abc"),
            Err(SearchError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(space.encode("az"), Err(SearchError::CharNotInCharset('z')));
    }

    #[test]
    fn test_large_space_has_no_precision_loss() {
        // 100 printable-ish characters, length 10 = 10^20 candidates
        let charset: Vec<char> = (0x21u8..0x21 + 100).map(char::from).collect();
        let space = SearchSpace::new(&charset, 10).unwrap();
        assert_eq!(space.size(), 100_000_000_000_000_000_000);

        let last = space.size() - 1;
        let candidate = space.decode(last).unwrap();
        assert_eq!(candidate, charset[99].to_string().repeat(10));
        assert_eq!(space.encode(&candidate).unwrap(), last);

        let mid = 12_345_678_901_234_567_890u128;
        assert_eq!(space.encode(&space.decode(mid).unwrap()).unwrap(), mid);
    }

    #[test]
    fn test_decode_into_reuses_buffer() {
        let space = SearchSpace::new(&chars("xy"), 3).unwrap();
        let mut buf = String::from("previous contents");
        space.decode_into(5, &mut buf).unwrap();
        assert_eq!(buf, "yxy");
    }

    #[test]
    fn test_decode_into_keeps_capacity() {
        let space = SearchSpace::new(&chars("abc"), 4).unwrap();
        let mut buf = String::with_capacity(4);
        let capacity = buf.capacity();

        for index in 0..space.size() {
            space.decode_into(index, &mut buf).unwrap();
            assert_eq!(buf.len(), 4);
            assert_eq!(buf.capacity(), capacity);
        }
        assert_eq!(buf, "cccc");
    }

    #[test]
    fn test_single_char_charset() {
        let space = SearchSpace::new(&chars("z"), 5).unwrap();
        assert_eq!(space.size(), 1);
        assert_eq!(space.decode(0).unwrap(), "zzzzz");
    }

    proptest! {
        #[test]
        fn prop_encode_inverts_decode(
            charset in proptest::collection::hash_set(proptest::char::range('!', '~'), 1..12),
            length in 1usize..6,
            seed in any::<u128>(),
        ) {
            let charset: Vec<char> = charset.into_iter().collect();
            let space = SearchSpace::new(&charset, length).unwrap();
            let index = seed % space.size();
            let candidate = decode(&space, index).unwrap();
            prop_assert_eq!(candidate.chars().count(), length);
            prop_assert_eq!(encode(&space, &candidate).unwrap(), index);
        }
    }
}
