#[cfg(test)]
mod common;

#[cfg(test)]
mod search_proxy_tests;



#[cfg(test)]
mod edge_router_tests;
