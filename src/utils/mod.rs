pub mod limited_spawner;
pub mod multierr;
pub mod throttle;
