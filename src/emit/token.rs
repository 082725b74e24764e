use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use std::borrow::Cow;
use std::fmt;

/// Scale for axis and geometry words, e.g. `X1.500`.
const AXIS_SCALE: u32 = 3;
/// Scale for extrusion distances, e.g. `E0.04000`.
const EXTRUSION_SCALE: u32 = 5;

/// The output unit for g-code emission implementing [std::fmt::Display]
#[derive(Clone, PartialEq, Debug)]
pub enum Token<'a> {
    Field(Field<'a>),
    Flag(Flag<'a>),
    Comment(Cow<'a, str>),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{field}"),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Comment(inner) => write!(f, "; {inner}"),
        }
    }
}

/// Fundamental unit of g-code: a descriptive letter followed by a value.
///
/// Field type supports owned and partially-borrowed representations using [Cow].
#[derive(Clone, PartialEq, Debug)]
pub struct Field<'a> {
    pub letters: Cow<'a, str>,
    pub value: Value<'a>,
}

impl<'a> Field<'a> {
    pub fn new(letters: &'a str, value: Value<'a>) -> Self {
        Self {
            letters: Cow::Borrowed(letters),
            value,
        }
    }

    /// Returns an owned representation of the Field valid for the `'static` lifetime.
    ///
    /// This will allocate any string types.
    pub fn into_owned(self) -> Field<'static> {
        Field {
            letters: self.letters.into_owned().into(),
            value: self.value.into_owned(),
        }
    }
}

impl<'a> From<Field<'a>> for Token<'a> {
    fn from(field: Field<'a>) -> Token<'a> {
        Self::Field(field)
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letters, self.value)
    }
}

/// A parameter letter with no value, e.g. the `W` in `G28 W`.
#[derive(Clone, PartialEq, Debug)]
pub struct Flag<'a> {
    pub letter: Cow<'a, str>,
}

impl<'a> Flag<'a> {
    pub fn new(letter: &'a str) -> Self {
        Self {
            letter: Cow::Borrowed(letter),
        }
    }
}

impl<'a> From<Flag<'a>> for Token<'a> {
    fn from(flag: Flag<'a>) -> Token<'a> {
        Self::Flag(flag)
    }
}

impl fmt::Display for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)
    }
}

/// All the possible variations of a field's value.
///
/// [Value::Literal] is rendered verbatim; the corpus uses it for value
/// tokens that are deliberately not numbers.
#[derive(Clone, PartialEq, Debug)]
pub enum Value<'a> {
    Rational(Decimal),
    Integer(usize),
    Literal(Cow<'a, str>),
}

impl Value<'_> {
    /// An axis or geometry value, rendered with exactly three decimal places.
    pub fn axis(value: f64) -> Value<'static> {
        Self::fixed(value, AXIS_SCALE)
    }

    /// An extrusion distance, rendered with exactly five decimal places.
    pub fn extrusion(value: f64) -> Value<'static> {
        Self::fixed(value, EXTRUSION_SCALE)
    }

    fn fixed(value: f64, scale: u32) -> Value<'static> {
        let mut fixed = Decimal::from_f64_retain(value)
            .unwrap_or_default()
            .round_dp(scale);
        fixed.rescale(scale);
        Value::Rational(fixed)
    }

    /// Interpret the value as an [f64]
    ///
    /// Returns [Option::None] for a [Value::Literal] or a [Value::Rational]
    /// that can't be converted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Rational(r) => r.to_f64(),
            Self::Integer(i) => Some(*i as f64),
            Self::Literal(_) => None,
        }
    }

    /// Returns an owned representation of the Value valid for the `'static` lifetime.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::Rational(r) => Value::Rational(r),
            Self::Integer(i) => Value::Integer(i),
            Self::Literal(s) => Value::Literal(s.into_owned().into()),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(r) => write!(f, "{r}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Literal(s) => write!(f, "{s}"),
        }
    }
}
