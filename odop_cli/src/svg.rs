//! SVG choropleth writer.
//!
//! Serializes an assembled [`ChoroplethLayer`] into a standalone SVG
//! document: one filled path per boundary shape, a product-count label
//! at each matched shape's centroid, and the six-bucket legend.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use odop_lib::{ChoroplethLayer, ColorBucket, Level};

/// Serialize a layer into an SVG document string.
pub fn layer_to_svg(layer: &ChoroplethLayer, width: f64, height: f64) -> String {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .expect("write xml decl");

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    svg.push_attribute(("width", format_number(width).as_str()));
    svg.push_attribute(("height", format_number(height).as_str()));
    svg.push_attribute((
        "viewBox",
        format!("0 0 {} {}", format_number(width), format_number(height)).as_str(),
    ));
    writer.write_event(Event::Start(svg)).expect("write svg open");

    // Boundary shapes, colored by bucket.
    let stroke = match layer.level {
        Level::State => "#ffffff",
        Level::District => "#475569",
    };
    let mut regions = BytesStart::new("g");
    regions.push_attribute(("class", "regions"));
    writer.write_event(Event::Start(regions)).expect("write regions open");
    for shape in &layer.shapes {
        let d = path_data(&layer.projected_rings(shape));
        let mut path = BytesStart::new("path");
        path.push_attribute(("d", d.as_str()));
        path.push_attribute(("fill", shape.bucket.fill()));
        path.push_attribute(("fill-opacity", "0.8"));
        path.push_attribute(("stroke", stroke));
        path.push_attribute(("stroke-width", "1"));
        writer.write_event(Event::Empty(path)).expect("write path");
    }
    writer
        .write_event(Event::End(BytesEnd::new("g")))
        .expect("write regions close");

    // Count labels at the centroid of every matched shape.
    let mut labels = BytesStart::new("g");
    labels.push_attribute(("class", "labels"));
    writer.write_event(Event::Start(labels)).expect("write labels open");
    for shape in &layer.shapes {
        if shape.count == 0 {
            continue;
        }
        let Some((x, y)) = layer.label_point(shape) else {
            continue;
        };
        let mut text = BytesStart::new("text");
        text.push_attribute(("x", format_number(x).as_str()));
        text.push_attribute(("y", format_number(y).as_str()));
        text.push_attribute(("text-anchor", "middle"));
        text.push_attribute(("dominant-baseline", "middle"));
        text.push_attribute(("font-size", "11"));
        text.push_attribute(("font-weight", "bold"));
        text.push_attribute(("fill", "#1F2937"));
        writer.write_event(Event::Start(text)).expect("write text open");
        writer
            .write_event(Event::Text(BytesText::new(&shape.count.to_string())))
            .expect("write text content");
        writer
            .write_event(Event::End(BytesEnd::new("text")))
            .expect("write text close");
    }
    writer
        .write_event(Event::End(BytesEnd::new("g")))
        .expect("write labels close");

    write_legend(&mut writer, height);

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .expect("write svg close");

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).expect("svg output is utf-8")
}

fn write_legend(writer: &mut Writer<Cursor<Vec<u8>>>, height: f64) {
    let mut legend = BytesStart::new("g");
    legend.push_attribute(("class", "legend"));
    writer.write_event(Event::Start(legend)).expect("write legend open");

    let y = height - 24.0;
    for (i, bucket) in ColorBucket::legend().iter().enumerate() {
        let x = 16.0 + 76.0 * i as f64;

        let mut swatch = BytesStart::new("rect");
        swatch.push_attribute(("x", format_number(x).as_str()));
        swatch.push_attribute(("y", format_number(y).as_str()));
        swatch.push_attribute(("width", "14"));
        swatch.push_attribute(("height", "14"));
        swatch.push_attribute(("rx", "3"));
        swatch.push_attribute(("fill", bucket.fill()));
        writer.write_event(Event::Empty(swatch)).expect("write swatch");

        let mut label = BytesStart::new("text");
        label.push_attribute(("x", format_number(x + 18.0).as_str()));
        label.push_attribute(("y", format_number(y + 11.0).as_str()));
        label.push_attribute(("font-size", "11"));
        label.push_attribute(("fill", "#4B5563"));
        writer.write_event(Event::Start(label)).expect("write label open");
        writer
            .write_event(Event::Text(BytesText::new(bucket.label())))
            .expect("write label content");
        writer
            .write_event(Event::End(BytesEnd::new("text")))
            .expect("write label close");
    }

    writer
        .write_event(Event::End(BytesEnd::new("g")))
        .expect("write legend close");
}

/// SVG path data for a set of projected rings.
fn path_data(rings: &[Vec<(f64, f64)>]) -> String {
    let mut d = String::new();
    for ring in rings {
        let mut coords = ring.iter();
        let Some((x, y)) = coords.next() else {
            continue;
        };
        d.push_str(&format!("M{},{}", format_number(*x), format_number(*y)));
        for (x, y) in coords {
            d.push_str(&format!("L{},{}", format_number(*x), format_number(*y)));
        }
        d.push('Z');
    }
    d
}

fn format_number(value: f64) -> String {
    // One decimal place is plenty at screen resolution and keeps the
    // document small.
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    use odop_lib::boundary::{BoundarySet, STATE_NAME_KEYS};
    use odop_lib::{ChoroplethLayer, Level, Mercator};

    fn sample_layer() -> ChoroplethLayer {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "NAME_1": "Odisha" },
                    "geometry": { "type": "Polygon", "coordinates":
                        [[[84.0, 20.0], [85.0, 20.0], [85.0, 21.0], [84.0, 21.0], [84.0, 20.0]]] }
                },
                {
                    "type": "Feature",
                    "properties": { "NAME_1": "Nowhere" },
                    "geometry": { "type": "Polygon", "coordinates":
                        [[[70.0, 10.0], [71.0, 10.0], [71.0, 11.0], [70.0, 11.0], [70.0, 10.0]]] }
                }
            ]
        }"#;
        let boundaries = BoundarySet::from_geojson_str(raw, STATE_NAME_KEYS).unwrap();
        let mut counts = BTreeMap::new();
        counts.insert("Odisha".to_string(), 42);
        ChoroplethLayer::build(
            Level::State,
            &boundaries,
            &counts,
            &HashMap::new(),
            Mercator::fitted(1000.0, 700.0),
        )
    }

    #[test]
    fn svg_has_document_structure() {
        let svg = layer_to_svg(&sample_layer(), 1000.0, 700.0);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 1000 700\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn svg_has_one_path_per_shape() {
        let svg = layer_to_svg(&sample_layer(), 1000.0, 700.0);
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn matched_shape_uses_bucket_fill() {
        let svg = layer_to_svg(&sample_layer(), 1000.0, 700.0);
        // 42 products falls in the 26-50 bucket.
        assert!(svg.contains("fill=\"#FB923C\""));
        // The unmatched shape renders as no-data gray.
        assert!(svg.contains("fill=\"#E5E7EB\""));
    }

    #[test]
    fn count_label_only_for_matched_shape() {
        let svg = layer_to_svg(&sample_layer(), 1000.0, 700.0);
        assert!(svg.contains(">42</text>"));
        assert!(!svg.contains(">0</text>"));
    }

    #[test]
    fn legend_lists_all_six_buckets() {
        let svg = layer_to_svg(&sample_layer(), 1000.0, 700.0);
        for bucket in ColorBucket::legend() {
            assert!(svg.contains(bucket.label()), "missing label {}", bucket.label());
            assert!(svg.contains(bucket.fill()), "missing fill {}", bucket.fill());
        }
    }

    #[test]
    fn path_data_closes_rings() {
        let rings = vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]];
        let d = path_data(&rings);
        assert!(d.starts_with("M0,0"));
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('L').count(), 3);
    }
}
