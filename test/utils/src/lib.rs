/// A 1x1 white PNG, base64 encoded.
pub fn image_fixture() -> &'static str {
    return "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mP8/x8AAwMCAO+ip1sAAAAASUVORK5CYII=";
}

pub fn upload_response_fixture(detections: usize) -> String {
    let classes = ["nodule", "opacity", "fracture", "effusion"];
    let detections = (0..detections)
        .map(|idx| {
            return serde_json::json!({
                "class": classes[idx % classes.len()],
                "confidence": 0.873 - (idx as f64 * 0.1),
                "bbox": [10.0, 20.0, 110.0, 220.0],
            });
        })
        .collect::<Vec<serde_json::Value>>();

    return serde_json::json!({
        "success": true,
        "filename": "scan.png",
        "image_data": image_fixture(),
        "detections": detections,
    })
    .to_string();
}
