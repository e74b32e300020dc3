mod builder;
pub use builder::EntityBuilder;

mod entity;
pub use entity::Entity;

mod field;
pub use field::{Field, FieldDefault, FieldKind};

mod trigger;
pub use trigger::{Trigger, Triggers};
