pub mod rust_lomuto_sequential;

// Fork-join on a process-wide pool with the default block threshold and pool size.
pub mod rust_lomuto_parallel;
