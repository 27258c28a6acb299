use crate::TokenKind;

const _: () = assert!((TokenKind::EOF as u32) < u128::BITS, "token kinds no longer fit a TokenSet");

/// A set of token kinds, one bit per kind, usable in `const` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: Self = Self(0);

    pub const fn new<const N: usize>(kinds: [TokenKind; N]) -> Self {
        let mut bits = 0;
        let mut index = 0;
        while index < N {
            bits |= bit(kinds[index]);
            index += 1;
        }
        Self(bits)
    }

    pub const fn union(self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(&self, kind: TokenKind) -> bool {
        self.0 & bit(kind) != 0
    }
}

const fn bit(kind: TokenKind) -> u128 {
    1 << kind as u8
}
