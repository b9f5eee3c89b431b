#[macro_export]
macro_rules! log_err {
    // Usage: log_err!(err, "failed to load pages for {}", owner_id);
    ($err:expr, $($msg:tt)+) => {{
        ::tracing::warn!(
            location = concat!(file!(), ":", line!()),
            error = %$err,
            $($msg)+
        );
    }};
}
