use fdesk_derive::api_model;

#[api_model(defaults)]
#[derive(Default)]
pub struct Part {
    pub id: u64,
    pub name: String,
}

#[api_model(rename_all = "snake_case")]
pub enum Status {
    InStock,
    Sold,
}

fn main() {
    let part = Part::default();
    let _copy = part.clone();
    assert_eq!(part, Part::default());
    let _ = Status::InStock.clone();
}
