pub mod leaves;
pub mod range;
