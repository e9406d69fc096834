pub mod d400_dashboard_stats;
