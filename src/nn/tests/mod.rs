mod graph_basic;
mod graph_forward;
mod node_add;
