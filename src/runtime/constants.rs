// Constants for the C runtime

/// Cells in the reserved stack store handed to the entry point
pub const DEFAULT_STACK_CELLS: usize = 1024;

/// Value returned by stream functions on failure
pub const EOF: i64 = -1;

/// Text a NULL `char*` resolves to when formatted
pub const NULL_STRING: &str = "(null)";
