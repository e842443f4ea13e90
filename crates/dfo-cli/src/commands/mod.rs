pub mod check;
pub mod classes;
pub mod count;
pub mod enumerate;
pub mod fixed_column;
