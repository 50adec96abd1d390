//! Renders a services module and drives the checked-in rendering against the client runtime.

use std::sync::Arc;

use fetchgen::generator::{OperationPlan, ServiceConfig, generate_services};
use fetchgen_client::{
  Bytes, Client, Config, HttpRequest, HttpResponse, Options, ResponseError, StatusCode, Transport, TransportError,
};
use http::{Method, header::CONTENT_TYPE};

mod models {
  use fetchgen_client::{DataParts, OperationData, Plain, to_parameter_map};

  #[derive(Debug, serde::Serialize)]
  pub struct GetPetByIdData {
    pub id: i64,
  }

  impl OperationData for GetPetByIdData {
    type Shape = Plain;

    fn into_parts(self) -> Result<DataParts, serde_json::Error> {
      Ok(DataParts {
        path: to_parameter_map(&self)?,
        ..DataParts::default()
      })
    }
  }

  #[derive(Debug, PartialEq, serde::Deserialize)]
  pub struct Pet {
    pub id: i64,
    pub name: String,
  }

  #[derive(Debug, PartialEq, serde::Deserialize)]
  pub struct ApiError {
    pub message: String,
  }
}

mod services {
  use super::models::*;

  include!("fixtures/pet_services.rs");
}

use models::{ApiError, GetPetByIdData, Pet};

const FIXTURE: &str = include_str!("fixtures/pet_services.rs");

fn operations() -> Vec<OperationPlan> {
  vec![
    OperationPlan::builder()
      .operation_id("getPetById")
      .method(Method::GET)
      .path("/pets/{id}")
      .summary("Find pet by ID")
      .data_type("GetPetByIdData")
      .response_type("Pet")
      .error_type("ApiError")
      .build(),
    OperationPlan::builder()
      .operation_id("ping")
      .method(Method::HEAD)
      .path("/ping")
      .build(),
  ]
}

/// Answers `/pets/7` with a pet, any other pet with 404 and everything else with an empty 200.
fn pet_store() -> Client {
  let transport: Arc<dyn Transport> = Arc::new(|request: HttpRequest| async move {
    let path = request.uri().path().to_string();
    let (status, body) = match path.as_str() {
      "/v1/pets/7" => (StatusCode::OK, r#"{"id":7,"name":"rex"}"#),
      p if p.starts_with("/v1/pets/") => (StatusCode::NOT_FOUND, r#"{"message":"no such pet"}"#),
      _ => (StatusCode::OK, ""),
    };
    let response: HttpResponse = http::Response::builder()
      .status(status)
      .header(CONTENT_TYPE, "application/json")
      .header(http::header::CONTENT_LENGTH, body.len())
      .body(Bytes::from_static(body.as_bytes()))
      .unwrap();
    Ok::<_, TransportError>(response)
  });

  Client::new(
    Config::builder()
      .base_url("https://pets.test/v1")
      .global(false)
      .fetch(transport)
      .build(),
  )
}

#[test]
fn test_rendered_module_matches_fixture() {
  let code = generate_services(&operations(), &ServiceConfig::default()).unwrap();

  for line in FIXTURE.lines().map(str::trim).filter(|line| !line.is_empty()) {
    assert!(code.contains(line), "expected '{line}' in output:\n{code}");
  }
  syn::parse_file(&code).unwrap();
}

#[tokio::test]
async fn test_generated_service_returns_data() {
  let options = Options::new(GetPetByIdData { id: 7 }).client(pet_store());
  let result = services::get_pet_by_id(options).await.unwrap();

  assert_eq!(result.request.method(), Method::GET);
  assert_eq!(
    result.into_result().unwrap(),
    Pet {
      id: 7,
      name: "rex".to_string()
    }
  );
}

#[tokio::test]
async fn test_generated_service_returns_api_error() {
  let options = Options::new(GetPetByIdData { id: 8 }).client(pet_store());
  let result = services::get_pet_by_id(options).await.unwrap();

  match result.into_result() {
    Err(ResponseError::Api { status, error }) => {
      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(error, ApiError { message: "no such pet".to_string() });
    }
    other => panic!("Expected Api error, got {other:?}"),
  }
}

#[tokio::test]
async fn test_generated_service_without_data() {
  let result = services::ping(Options::new(()).client(pet_store())).await.unwrap();

  assert_eq!(result.request.method(), Method::HEAD);
  assert_eq!(result.data(), Some(&serde_json::Value::Null));
}
