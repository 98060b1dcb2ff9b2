/// Render a message template.
///
/// `msg!(MESSAGES.config.installed, pid = pid)` binds `{pid}` and returns the
/// filled `String`. Values go through `Into<String>`.
#[macro_export]
macro_rules! msg {
    ($template:expr) => {
        $crate::builder::MessageBuilder::new($template).build()
    };
    ($template:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $crate::builder::MessageBuilder::new($template)
            $(.var(stringify!($name), $value))+
            .build()
    };
}
