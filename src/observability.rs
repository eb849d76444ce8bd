use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("deskchat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("deskchat.client.request_errors");

pub(crate) static SESSION_CREATES: Counter = Counter::new("deskchat.session.creates");
pub(crate) static SESSION_RESETS: Counter = Counter::new("deskchat.session.resets");

pub(crate) static CHAT_SENDS: Counter = Counter::new("deskchat.chat.sends");
pub(crate) static CHAT_SEND_ERRORS: Counter = Counter::new("deskchat.chat.send_errors");
pub(crate) static CHAT_ESCALATIONS: Counter = Counter::new("deskchat.chat.escalations");

pub(crate) static HISTORY_LOADS: Counter = Counter::new("deskchat.history.loads");
pub(crate) static HISTORY_LOAD_ERRORS: Counter = Counter::new("deskchat.history.load_errors");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&SESSION_CREATES);
    collector.register_counter(&SESSION_RESETS);

    collector.register_counter(&CHAT_SENDS);
    collector.register_counter(&CHAT_SEND_ERRORS);
    collector.register_counter(&CHAT_ESCALATIONS);

    collector.register_counter(&HISTORY_LOADS);
    collector.register_counter(&HISTORY_LOAD_ERRORS);
}
