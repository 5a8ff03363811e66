mod iqa;
pub use self::iqa::IqaQuery;
