//! Format layer creation macros

/// Build a boxed `fmt` layer for the `pretty` or `compact` formatter.
macro_rules! create_fmt_layer {
    ($format:ident, $display:expr) => {{
        let layer = tracing_subscriber::fmt::layer()
            .$format()
            .with_writer(std::io::stderr)
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
            .with_thread_ids($display.thread_ids);

        let boxed: $crate::builder::BoxedLayer = if $display.time {
            Box::new(layer)
        } else {
            Box::new(layer.without_time())
        };
        boxed
    }};
}

/// Build a boxed JSON layer (has additional options)
macro_rules! create_json_layer {
    ($display:expr) => {{
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .flatten_event($display.flatten)
            .with_ansi(false)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
            .with_thread_ids($display.thread_ids);

        let boxed: $crate::builder::BoxedLayer = if $display.time {
            Box::new(layer)
        } else {
            Box::new(layer.without_time())
        };
        boxed
    }};
}
