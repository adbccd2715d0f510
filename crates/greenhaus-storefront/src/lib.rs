pub mod carousel;
pub mod filter;
pub mod thc;

pub use carousel::{
    Carousel, CarouselCommand, CarouselDriver, CarouselError, Direction, Snapshot, SwipeState,
};
pub use filter::{filter_products, sort_products, ProductFilter};
pub use thc::{parse_cbd, parse_thc, BELOW_DETECTION};
