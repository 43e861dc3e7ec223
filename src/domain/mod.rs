// Domain layer: run context, board entities and the Trello API port.

pub mod model;
pub mod ports;
