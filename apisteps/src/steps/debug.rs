use crate::{error::Error, State};
use serde_json::Value;
use std::time::Duration;

impl State {
    pub async fn i_wait(&self, duration: Duration) -> Result<(), Error> {
        tokio::time::sleep(duration).await;

        Ok(())
    }

    /// Prints through the debugger whether or not debug mode is on. JSON
    /// bodies are pretty printed, anything else is printed as received.
    pub fn i_print_last_response_body(&self) -> Result<(), Error> {
        let body = &self.http_context.last_response()?.body;

        let pretty = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok());
        self.debugger.print(pretty.as_deref().unwrap_or(body));

        Ok(())
    }

    pub fn i_start_debug_mode(&self) -> Result<(), Error> {
        self.debugger.turn_on();

        Ok(())
    }

    pub fn i_stop_debug_mode(&self) -> Result<(), Error> {
        self.debugger.turn_off();

        Ok(())
    }
}
