mod num;

mod value;
pub use value::Value;
