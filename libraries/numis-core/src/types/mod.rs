mod coin;
mod ids;
mod image;
mod price;
mod user;

pub use coin::{Coin, CoinDetails, CoinFilter, CoinPayload, CoinUpdate, Orientation};
pub use ids::{CoinId, UserId};
pub use image::ImageRef;
pub use price::{CurrencyCode, Price};
pub use user::AuthUser;
