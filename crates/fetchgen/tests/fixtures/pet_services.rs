#[allow(unused_imports)]
use fetchgen_client::{Method, Options, ResponseFuture, Value, send};
/// Find pet by ID
///
/// `GET /pets/{id}`
pub fn get_pet_by_id(options: Options<GetPetByIdData>) -> ResponseFuture<Pet, ApiError> {
    return send::<Pet, ApiError, GetPetByIdData>(Method::GET, "/pets/{id}", options);
}
/// `HEAD /ping`
pub fn ping(options: Options<()>) -> ResponseFuture<Value, Value> {
    return send::<Value, Value, ()>(Method::HEAD, "/ping", options);
}
