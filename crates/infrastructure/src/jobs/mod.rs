mod zone_refresh;

pub use zone_refresh::ZoneRefreshJob;
