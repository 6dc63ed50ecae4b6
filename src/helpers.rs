/// Builds a step `execute` closure calling `f(&service, args..)`.
///
/// The service is evaluated right away. Arguments are moved into the closure
/// and evaluated when the step runs, so pass owned values rather than
/// expressions borrowing from the caller.
#[macro_export]
macro_rules! execute_with {
    ($f:expr, $service:expr $(, $arg:expr)* $(,)?) => {{
        let service = $service;
        move || async move { $f(&service $(, $arg)*).await }
    }};
}

/// Builds a step `compensate` closure calling `f(&service, output, args..)`.
#[macro_export]
macro_rules! compensate_with {
    ($f:expr, $service:expr $(, $arg:expr)* $(,)?) => {{
        let service = $service;
        move |output| async move { $f(&service, output $(, $arg)*).await }
    }};
}
