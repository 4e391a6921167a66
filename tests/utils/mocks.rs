use std::collections::VecDeque;
use tokio::sync::mpsc;

use roomchat::SessionState;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Stand-in for a WebSocket client: owns the session state a real connection
/// would hold and collects everything written to its outbound queue
pub struct MockClient {
    pub session: SessionState,
    outbound: mpsc::UnboundedReceiver<String>,
    inbox: VecDeque<String>,
}

impl MockClient {
    pub fn new(connection_id: &str) -> Self {
        let (sender, outbound) = mpsc::unbounded_channel();
        Self {
            session: SessionState::new(connection_id.to_string(), sender),
            outbound,
            inbox: VecDeque::new(),
        }
    }

    /// Move anything queued for this client into its inbox
    fn collect(&mut self) {
        while let Ok(message) = self.outbound.try_recv() {
            self.inbox.push_back(message);
        }
    }

    pub fn get_messages(&mut self) -> Vec<String> {
        self.collect();
        self.inbox.iter().cloned().collect()
    }

    pub fn consume_message(&mut self) -> Option<String> {
        self.collect();
        self.inbox.pop_front()
    }

    pub fn clear_messages(&mut self) {
        self.collect();
        self.inbox.clear();
    }
}
