//! 事件总线 - broadcast 实现

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{DiningEvent, DiningMessage, EventNotifier};
use crate::utils::Clock;

/// 事件总线
///
/// Fire-and-forget fan-out: publishing with no subscriber is logged, never
/// an error. Slow subscribers see `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DiningMessage>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("tx", &"<broadcast::Sender>")
            .field("receivers", &self.tx.receiver_count())
            .finish()
    }
}

impl EventBus {
    pub fn new(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx, clock }
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<DiningMessage> {
        self.tx.subscribe()
    }

    /// 发布事件，返回收到的订阅者数量
    pub fn publish(&self, event: DiningEvent) -> usize {
        let message = DiningMessage::new(event, self.clock.now_millis());
        let name = message.name();
        match self.tx.send(message) {
            Ok(receivers) => {
                tracing::debug!(event = name, receivers, "Event published");
                receivers
            }
            Err(_) => {
                tracing::warn!(event = name, "Event broadcast failed: no active receivers");
                0
            }
        }
    }
}

#[async_trait]
impl EventNotifier for EventBus {
    async fn emit(&self, event: DiningEvent) {
        self.publish(event);
    }
}
