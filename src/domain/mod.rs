// ============================================================================
// Domain Models Module
// Measurement value type, its precision rules, operators and rendering
// ============================================================================

pub mod arithmetic;
pub mod display;
pub mod errors;
pub mod measurement;
pub mod operand;
pub mod precision;

pub use arithmetic::evaluate;
pub use errors::{MeasurementError, MeasurementResult};
pub use measurement::{Measurement, MeasurementBuilder};
pub use operand::{BinaryOp, IntoOperand, Operand, OperandKind, OperandRef};
pub use precision::{Precision, DEFAULT_UNCERTAINTY_DIGITS};
