use crate::error::{GepError, Result};
use crate::functions::traits::Primitive;

fn finite(alias: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GepError::Evaluation(format!("{} produced a non-finite value", alias)))
    }
}

// --- Arithmetic ---
pub struct Add;

impl Primitive for Add {
    fn ui_name(&self) -> &'static str { "Addition" }
    fn alias(&self) -> &'static str { "+" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> Result<f64> {
        finite(self.alias(), args[0] + args[1])
    }
}

pub struct Subtract;

impl Primitive for Subtract {
    fn ui_name(&self) -> &'static str { "Subtraction" }
    fn alias(&self) -> &'static str { "-" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> Result<f64> {
        finite(self.alias(), args[0] - args[1])
    }
}

pub struct Multiply;

impl Primitive for Multiply {
    fn ui_name(&self) -> &'static str { "Multiplication" }
    fn alias(&self) -> &'static str { "*" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> Result<f64> {
        finite(self.alias(), args[0] * args[1])
    }
}

pub struct Divide;

impl Primitive for Divide {
    fn ui_name(&self) -> &'static str { "Division" }
    fn alias(&self) -> &'static str { "/" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> Result<f64> {
        if args[1] == 0.0 {
            return Err(GepError::DivisionByZero);
        }
        finite(self.alias(), args[0] / args[1])
    }
}

// --- Power and roots ---
pub struct Power;

impl Primitive for Power {
    fn ui_name(&self) -> &'static str { "Power" }
    fn alias(&self) -> &'static str { "^" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> Result<f64> {
        if args[1] < 0.0 {
            return Err(GepError::Evaluation("negative exponent".to_string()));
        }
        finite(self.alias(), args[0].powf(args[1]))
    }
}

pub struct SquareRoot;

impl Primitive for SquareRoot {
    fn ui_name(&self) -> &'static str { "Square Root" }
    fn alias(&self) -> &'static str { "Q" }
    fn arity(&self) -> usize { 1 }
    fn execute(&self, args: &[f64]) -> Result<f64> {
        if args[0] < 0.0 {
            return Err(GepError::Evaluation("square root of a negative value".to_string()));
        }
        Ok(args[0].sqrt())
    }
}

pub struct Negate;

impl Primitive for Negate {
    fn ui_name(&self) -> &'static str { "Negation" }
    fn alias(&self) -> &'static str { "~" }
    fn arity(&self) -> usize { 1 }
    fn execute(&self, args: &[f64]) -> Result<f64> {
        Ok(-args[0])
    }
}
