pub mod daily_log;
pub mod habit;
pub mod value;

pub use daily_log::{DailyLog, FieldPatch};
pub use habit::{HabitCatalog, HabitDef, HabitKind};
pub use value::FieldValue;
