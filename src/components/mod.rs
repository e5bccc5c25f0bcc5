pub mod force_graph;
pub mod graph_loader;
pub mod network_stats;
pub mod paper_card;
pub mod search_panel;
