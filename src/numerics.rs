use std::fmt;

pub mod histogram;
pub mod random_source;
pub mod special;
pub mod statistics;

/// Number type of everything derived from raw variates: statistics, histogram heights,
/// plot coordinates.
pub type Rational = f32;

/// A raw draw from some distribution family, as stored in a sample table.
pub trait Variate: Copy + Default + Send + Sync + fmt::Display + 'static {
    fn to_rational(self) -> Rational;
    fn to_value(self) -> Value;
}

#[derive(Clone, Copy, PartialEq, Debug)]
/// Type-erased [`Variate`] for callers that don't know which family produced it.
pub enum Value {
    Boolean(bool),
    Integer(i32),
    Real(f32),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{}", u8::from(*b)),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(x) => write!(f, "{x:.*}", f32::DIGITS as usize),
        }
    }
}

impl Variate for bool {
    fn to_rational(self) -> Rational {
        Rational::from(u8::from(self))
    }

    fn to_value(self) -> Value {
        Value::Boolean(self)
    }
}

impl Variate for i32 {
    #[allow(clippy::cast_precision_loss)]
    fn to_rational(self) -> Rational {
        self as Rational
    }

    fn to_value(self) -> Value {
        Value::Integer(self)
    }
}

impl Variate for f32 {
    fn to_rational(self) -> Rational {
        self
    }

    fn to_value(self) -> Value {
        Value::Real(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, Variate};

    #[test]
    fn variates_convert_once() {
        assert_eq!(true.to_rational(), 1.0);
        assert_eq!(false.to_value(), Value::Boolean(false));
        assert_eq!((-3_i32).to_rational(), -3.0);
        assert_eq!(0.25_f32.to_value(), Value::Real(0.25));
    }

    #[test]
    fn values_print_like_the_table_dump() {
        assert_eq!(Value::Boolean(true).to_string(), "1");
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::Real(0.5).to_string(), "0.500000");
    }
}
