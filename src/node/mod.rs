//! 协议节点模块
//!
//! 滑动窗口的发送端/接收端状态与收发逻辑。

// 子模块声明
mod protocol_node;
mod snapshot;

// 重新导出公共接口
pub use protocol_node::ProtocolNode;
pub use snapshot::NodeSnapshot;
