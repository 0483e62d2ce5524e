/// 消息提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Info,
    Warning,
    Error,
}

/// 消息提示能力，浏览器中由 toast 组件实现
pub trait Notifier {
    fn message(&self, text: &str, kind: MessageKind);
}
