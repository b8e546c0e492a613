mod make_edge;
mod make_face;
mod make_prism;
mod make_shell;
mod make_solid;
mod make_wire;

pub use make_edge::MakeEdge;
pub use make_face::MakeFace;
pub use make_prism::MakePrism;
pub use make_shell::MakeShell;
pub use make_solid::MakeSolid;
pub use make_wire::MakeWire;

pub(crate) use make_shell::edge_uses;
