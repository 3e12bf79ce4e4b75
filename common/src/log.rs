/// Log target used for positive outcomes, rendered with a `[+]` prefix.
pub const SUCCESS_TARGET: &str = "geoscan::success";

/// Log target used for raw terminal output, rendered without any prefix.
pub const PRINT_TARGET: &str = "geoscan::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(target: "geoscan::success", $($arg)*)
    };
}
