pub mod inspection_routes;
