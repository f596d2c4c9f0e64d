pub mod http;
pub mod initiator;
pub mod options;

pub use http::HttpMembershipApi;
pub use initiator::{
    CheckoutError, CheckoutInitiator, CheckoutResult, CheckoutUi, MembershipApi, OrderSummary,
    SdkLoader, UiExit,
};
pub use options::{CheckoutOptions, PaymentAttempt, Prefill};
