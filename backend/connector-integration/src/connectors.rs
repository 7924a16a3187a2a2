pub mod soisy;

pub use self::soisy::Soisy;
