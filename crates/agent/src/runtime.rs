use std::sync::Arc;

use tracing::{debug, error};

use innkeeper_core::domain::{AgentReply, ConversationMessage};
use innkeeper_core::shop::ShopCatalog;

use crate::interpreter::ResponseInterpreter;
use crate::llm::LlmClient;
use crate::prompt::build_messages;

/// Returned whenever the provider call itself fails. The chat surface never
/// propagates an error to the caller.
const CONNECTIVITY_APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

pub struct AgentRuntime {
    llm: Arc<dyn LlmClient>,
    interpreter: ResponseInterpreter,
}

impl AgentRuntime {
    pub fn new(llm: Arc<dyn LlmClient>, shop: Arc<ShopCatalog>) -> Self {
        Self { llm, interpreter: ResponseInterpreter::new(shop) }
    }

    /// One chat turn: assemble the prompt, make a single completion call,
    /// interpret the result.
    pub async fn chat(&self, history: &[ConversationMessage]) -> AgentReply {
        let messages = build_messages(history);

        match self.llm.complete(&messages).await {
            Ok(content) => {
                debug!(raw = %content, "language-model completion received");
                self.interpreter.interpret(&content)
            }
            Err(error) => {
                error!(error = %error, "language-model call failed, degrading to apology");
                AgentReply::message(CONNECTIVITY_APOLOGY)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    use innkeeper_core::domain::{AgentReply, ConversationMessage};
    use innkeeper_core::fixtures::FixtureStore;
    use innkeeper_core::shop::ShopCatalog;

    use crate::llm::{ChatMessage, LlmClient};

    use super::{AgentRuntime, CONNECTIVITY_APOLOGY};

    struct ScriptedLlm {
        reply: Result<String, String>,
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            self.reply.clone().map_err(|message| anyhow!(message))
        }
    }

    fn runtime(reply: Result<String, String>) -> AgentRuntime {
        let fixtures = FixtureStore::load(None).expect("fixtures should load");
        let shop = Arc::new(ShopCatalog::new(&fixtures));
        AgentRuntime::new(Arc::new(ScriptedLlm { reply }), shop)
    }

    #[tokio::test]
    async fn conversational_completion_comes_back_as_a_message() {
        let runtime = runtime(Ok("Which city would you like to visit?".to_owned()));

        let reply = runtime.chat(&[ConversationMessage::user("hi")]).await;
        assert_eq!(reply, AgentReply::message("Which city would you like to visit?"));
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_the_fixed_apology() {
        let runtime = runtime(Err("connect timeout".to_owned()));

        let reply = runtime.chat(&[ConversationMessage::user("hi")]).await;
        assert_eq!(reply, AgentReply::message(CONNECTIVITY_APOLOGY));
    }
}
