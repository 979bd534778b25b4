//! Restriction trees (address book filters).

use crate::model::{PropertyTag, PropertyValue};

/// Wire tag of each restriction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RestrictionType {
    And = 0x00,
    Or = 0x01,
    Not = 0x02,
    Content = 0x03,
    Property = 0x04,
    Exist = 0x08,
}

impl RestrictionType {
    pub fn from_u32(v: u32) -> Option<RestrictionType> {
        match v {
            0x00 => Some(RestrictionType::And),
            0x01 => Some(RestrictionType::Or),
            0x02 => Some(RestrictionType::Not),
            0x03 => Some(RestrictionType::Content),
            0x04 => Some(RestrictionType::Property),
            0x08 => Some(RestrictionType::Exist),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RestrictionType::And => "And",
            RestrictionType::Or => "Or",
            RestrictionType::Not => "Not",
            RestrictionType::Content => "Content",
            RestrictionType::Property => "Property",
            RestrictionType::Exist => "Exist",
        }
    }
}

/// Relational operator of a property restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RelOp {
    LessThan = 0x00,
    LessThanOrEqual = 0x01,
    GreaterThan = 0x02,
    GreaterThanOrEqual = 0x03,
    Equal = 0x04,
    NotEqual = 0x05,
    /// Regular-expression match.
    MatchesPattern = 0x06,
}

impl RelOp {
    pub fn from_u32(v: u32) -> Option<RelOp> {
        match v {
            0x00 => Some(RelOp::LessThan),
            0x01 => Some(RelOp::LessThanOrEqual),
            0x02 => Some(RelOp::GreaterThan),
            0x03 => Some(RelOp::GreaterThanOrEqual),
            0x04 => Some(RelOp::Equal),
            0x05 => Some(RelOp::NotEqual),
            0x06 => Some(RelOp::MatchesPattern),
            _ => None,
        }
    }
}

/// Fuzzy-level bits of a content restriction. The low word selects the
/// match mode, the high word holds modifier flags.
pub mod fuzzy_level {
    pub const FULL_STRING: u32 = 0x0000_0000;
    pub const SUBSTRING: u32 = 0x0000_0001;
    pub const PREFIX: u32 = 0x0000_0002;
    pub const IGNORE_CASE: u32 = 0x0001_0000;
    pub const IGNORE_NON_SPACE: u32 = 0x0002_0000;
    pub const LOOSE: u32 = 0x0004_0000;
}

/// A filter tree node. Each parent exclusively owns its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Restriction {
    And(Vec<Restriction>),
    Or(Vec<Restriction>),
    Not(Box<Restriction>),
    Content {
        fuzzy_level: u32,
        tag: PropertyTag,
        value: PropertyValue,
    },
    Property {
        relop: RelOp,
        tag: PropertyTag,
        value: PropertyValue,
    },
    Exist {
        tag: PropertyTag,
    },
}

impl Restriction {
    pub fn restriction_type(&self) -> RestrictionType {
        match self {
            Restriction::And(_) => RestrictionType::And,
            Restriction::Or(_) => RestrictionType::Or,
            Restriction::Not(_) => RestrictionType::Not,
            Restriction::Content { .. } => RestrictionType::Content,
            Restriction::Property { .. } => RestrictionType::Property,
            Restriction::Exist { .. } => RestrictionType::Exist,
        }
    }

    pub fn negate(inner: Restriction) -> Self {
        Restriction::Not(Box::new(inner))
    }

    /// Content restriction whose tag is taken from the compared value.
    pub fn content(fuzzy_level: u32, value: PropertyValue) -> Self {
        Restriction::Content {
            fuzzy_level,
            tag: value.tag,
            value,
        }
    }

    /// Property restriction whose tag is taken from the compared value.
    pub fn property(relop: RelOp, value: PropertyValue) -> Self {
        Restriction::Property {
            relop,
            tag: value.tag,
            value,
        }
    }

    pub fn exist(tag: PropertyTag) -> Self {
        Restriction::Exist { tag }
    }

    /// Nesting depth; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Restriction::And(children) | Restriction::Or(children) => {
                1 + children.iter().map(Restriction::depth).max().unwrap_or(0)
            }
            Restriction::Not(inner) => 1 + inner.depth(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaggedValue;

    #[test]
    fn test_depth() {
        let leaf = Restriction::exist(PropertyTag::from_raw(0x3001_001F));
        assert_eq!(leaf.depth(), 1);

        let tree = Restriction::And(vec![
            Restriction::negate(leaf.clone()),
            Restriction::Or(vec![Restriction::negate(Restriction::negate(leaf.clone()))]),
        ]);
        assert_eq!(tree.depth(), 5);
        assert_eq!(Restriction::And(vec![]).depth(), 1);

        // The deepest branch decides, wherever it sits.
        let uneven = Restriction::Or(vec![
            leaf.clone(),
            Restriction::And(vec![leaf.clone(), Restriction::negate(leaf.clone())]),
            Restriction::negate(leaf.clone()),
        ]);
        assert_eq!(uneven.depth(), 4);
        let deep_first = Restriction::And(vec![
            Restriction::negate(Restriction::negate(Restriction::negate(leaf.clone()))),
            leaf.clone(),
        ]);
        assert_eq!(deep_first.depth(), 5);
    }

    #[test]
    fn test_builders_take_value_tag() {
        let value = PropertyValue::new(0x3001, TaggedValue::String("al".to_string()));
        let r = Restriction::content(fuzzy_level::PREFIX | fuzzy_level::IGNORE_CASE, value.clone());
        match r {
            Restriction::Content { fuzzy_level, tag, .. } => {
                assert_eq!(fuzzy_level, 0x0001_0002);
                assert_eq!(tag, value.tag);
            }
            _ => panic!("expected Content restriction"),
        }
    }

    #[test]
    fn test_type_codes() {
        assert_eq!(RestrictionType::from_u32(8), Some(RestrictionType::Exist));
        assert_eq!(RestrictionType::from_u32(5), None);
        assert_eq!(RelOp::from_u32(4), Some(RelOp::Equal));
        assert_eq!(RelOp::from_u32(7), None);
    }
}
