pub mod gps_refresh;
