//! Modifier flags for types and members
//!
//! Bit values follow the JVM access flags so that modifiers read back from
//! the registry match what a class file reports.

use std::fmt;
use std::ops::BitOr;

use crate::error::TypeError;

/// Modifier flags (bitflags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u16);

impl Modifiers {
    /// No modifiers (package-private)
    pub const NONE: Self = Self(0x0000);
    /// Accessible from everywhere
    pub const PUBLIC: Self = Self(0x0001);
    /// Accessible only inside the declaring type
    pub const PRIVATE: Self = Self(0x0002);
    /// Accessible from subtypes
    pub const PROTECTED: Self = Self(0x0004);
    /// Belongs to the type rather than to instances
    pub const STATIC: Self = Self(0x0008);
    /// Cannot be overridden, extended, or reassigned
    pub const FINAL: Self = Self(0x0010);
    /// Declared as an interface
    pub const INTERFACE: Self = Self(0x0200);
    /// Has no implementation
    pub const ABSTRACT: Self = Self(0x0400);

    /// PUBLIC | PRIVATE | PROTECTED
    pub const VISIBILITY: Self = Self(0x0007);

    const KEYWORDS: [(Self, &'static str); 7] = [
        (Self::PUBLIC, "public"),
        (Self::PROTECTED, "protected"),
        (Self::PRIVATE, "private"),
        (Self::ABSTRACT, "abstract"),
        (Self::STATIC, "static"),
        (Self::FINAL, "final"),
        (Self::INTERFACE, "interface"),
    ];

    /// Create from raw bits
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get raw bits
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Check if all flags of `other` are set
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of flags
    pub const fn union(&self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection of flags
    pub const fn intersection(&self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Remove flags
    pub const fn difference(&self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Replace the visibility bits, keeping every other flag
    pub const fn with_visibility(&self, visibility: Self) -> Self {
        self.difference(Self::VISIBILITY)
            .union(visibility.intersection(Self::VISIBILITY))
    }

    /// Check that at most one visibility flag is set
    pub const fn has_single_visibility(&self) -> bool {
        (self.0 & Self::VISIBILITY.0).count_ones() <= 1
    }

    /// Check the public flag
    pub const fn is_public(&self) -> bool {
        self.contains(Self::PUBLIC)
    }

    /// Check the private flag
    pub const fn is_private(&self) -> bool {
        self.contains(Self::PRIVATE)
    }

    /// Check the protected flag
    pub const fn is_protected(&self) -> bool {
        self.contains(Self::PROTECTED)
    }

    /// Check the static flag
    pub const fn is_static(&self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Check the final flag
    pub const fn is_final(&self) -> bool {
        self.contains(Self::FINAL)
    }

    /// Check the abstract flag
    pub const fn is_abstract(&self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    /// Check the interface flag
    pub const fn is_interface(&self) -> bool {
        self.contains(Self::INTERFACE)
    }

    /// Parse a single keyword (case-insensitive)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim().to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, name)| *name == keyword)
            .map(|(flag, _)| *flag)
    }

    /// Parse a list of keywords, e.g. `["public", "static"]`
    pub fn from_keywords<I, S>(keywords: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keywords.into_iter().try_fold(Self::NONE, |acc, keyword| {
            let keyword = keyword.as_ref();
            Self::from_keyword(keyword)
                .map(|flag| acc.union(flag))
                .ok_or_else(|| TypeError::InvalidModifier {
                    keyword: keyword.to_string(),
                })
        })
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Self::KEYWORDS {
            if self.contains(flag) {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}
