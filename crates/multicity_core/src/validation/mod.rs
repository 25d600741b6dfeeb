pub mod field_id;
pub mod row_validator;
pub mod sequence_validator;
pub mod validation_error;
pub mod validation_outcome;
