use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use leaf_doctor::{
    advice::Advisor,
    engine::InferenceEngine,
    labels::ClassCatalog,
    pipeline::PredictionPipeline,
    server::{self, handlers::AppState},
};
use prost::Message;
use serde_json::Value;
use std::{
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};
use tract_onnx::pb::{
    AttributeProto, GraphProto, ModelProto, NodeProto, OperatorSetIdProto, TensorShapeProto,
    TypeProto, ValueInfoProto,
    attribute_proto::AttributeType,
    tensor_proto::DataType,
    tensor_shape_proto::{Dimension, dimension},
    type_proto,
};

pub const BOUNDARY: &str = "leaf-doctor-test-boundary";

/// Catalog used throughout the HTTP tests
pub fn test_catalog() -> ClassCatalog {
    ClassCatalog::new(vec![
        "Tomato_healthy".to_string(),
        "Potato_Early_blight".to_string(),
        "Pepper__bell__Bacterial_spot".to_string(),
    ])
}

pub fn create_pipeline(
    engine: Option<Arc<dyn InferenceEngine>>,
    catalog: ClassCatalog,
) -> PredictionPipeline {
    PredictionPipeline::new(engine, Arc::new(catalog), Advisor::default())
}

pub fn create_test_app(engine: Option<Arc<dyn InferenceEngine>>, catalog: ClassCatalog) -> Router {
    let state = AppState::new(create_pipeline(engine, catalog), "PlantVillage");
    server::router(state, 1024 * 1024)
}

/// A small leaf-green PNG
pub fn png_bytes() -> Vec<u8> {
    let image = RgbImage::from_pixel(48, 32, Rgb([34, 139, 34]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buf
}

/// Single-part multipart/form-data body
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn predict_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8081
  body_limit_bytes: 1048576
  logs:
    level: "debug"

model:
  weights_path: "/srv/models/leaf.onnx"
  classes_path: "/srv/models/classes.json"
  apply_softmax: false

service:
  dataset: "PlantVillage subset"
  low_confidence_threshold: 45.5
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;

fn float_value_info(name: &str, dims: &[i64]) -> ValueInfoProto {
    let dim = dims
        .iter()
        .map(|&d| Dimension {
            value: Some(dimension::Value::DimValue(d)),
            ..Default::default()
        })
        .collect();

    ValueInfoProto {
        name: name.to_string(),
        r#type: Some(TypeProto {
            value: Some(type_proto::Value::TensorType(type_proto::Tensor {
                elem_type: DataType::Float as i32,
                shape: Some(TensorShapeProto { dim }),
            })),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Writes a three-class ONNX model to `dir`: each score is the mean of one
/// input channel (`ReduceMean` over H and W).
pub fn write_channel_mean_model(dir: &Path) -> PathBuf {
    let node = NodeProto {
        input: vec!["input".to_string()],
        output: vec!["scores".to_string()],
        op_type: "ReduceMean".to_string(),
        attribute: vec![
            AttributeProto {
                name: "axes".to_string(),
                r#type: AttributeType::Ints as i32,
                ints: vec![2, 3],
                ..Default::default()
            },
            AttributeProto {
                name: "keepdims".to_string(),
                r#type: AttributeType::Int as i32,
                i: 0,
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let model = ModelProto {
        ir_version: 7,
        opset_import: vec![OperatorSetIdProto {
            domain: String::new(),
            version: 13,
        }],
        graph: Some(GraphProto {
            name: "channel-mean".to_string(),
            node: vec![node],
            input: vec![float_value_info("input", &[1, 3, 224, 224])],
            output: vec![float_value_info("scores", &[1, 3])],
            ..Default::default()
        }),
        ..Default::default()
    };

    let path = dir.join("channel_mean.onnx");
    std::fs::write(&path, model.encode_to_vec()).expect("Failed to write test model");
    path
}
