mod page;
pub use self::page::{Page, Record};
