// Domain layer: the generation result, the declared output schema and the
// port the model collaborator implements.

pub mod model;
pub mod ports;
pub mod schema;
