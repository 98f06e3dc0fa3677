mod make_box;
mod make_sphere;
mod make_tube;

pub use make_box::MakeBox;
pub use make_sphere::MakeSphere;
pub use make_tube::MakeTube;
