pub mod oauth;
mod twitter;

pub use oauth::OAuth1Signer;
pub use twitter::TwitterClient;
