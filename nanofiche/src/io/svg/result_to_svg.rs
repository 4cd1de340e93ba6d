use crate::entities::{EnvelopeGeometry, PackingResult};
use crate::geometry::Rect;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;
use svg::Document;
use svg::node::element::{Group, Text, Title};

pub fn result_to_svg(result: &PackingResult, options: SvgDrawOptions, title: &str) -> Document {
    let theme = &options.theme;
    let canvas = Rect {
        x_min: 0.0,
        y_min: 0.0,
        x_max: f64::max(result.canvas_width as f64, 1.0),
        y_max: f64::max(result.canvas_height as f64, 1.0),
    };
    let min_dim = f64::min(canvas.width(), canvas.height());
    let stroke_width = min_dim * 0.001 * theme.stroke_width_multiplier;
    let font_size = min_dim * 0.025;

    let label = {
        //print some information above the top left of the canvas
        let label_content = format!(
            "canvas: {}x{} | bins: {} | rows: {} | cols: {} | density: {:.3}% | {}",
            result.canvas_width,
            result.canvas_height,
            result.n_placed(),
            result.rows,
            result.columns,
            result.density() * 100.0,
            title,
        );
        Text::new(label_content)
            .set("x", canvas.x_min)
            .set("y", canvas.y_min - 0.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    //draw canvas and envelope
    let canvas_group = {
        let group = Group::new()
            .set("id", "canvas")
            .add(svg_util::data_to_path(
                svg_util::aa_rect_data(canvas),
                &[
                    ("fill", &*format!("{}", theme.canvas_fill)),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", stroke_width)),
                ],
            ))
            .add(Title::new(format!(
                "canvas, {}x{} px, {} px total",
                result.canvas_width,
                result.canvas_height,
                result.canvas_pixels()
            )));

        match options.envelope_outline {
            false => group,
            true => {
                let envelope_style = [
                    ("fill", &*format!("{}", theme.envelope_fill)),
                    ("fill-opacity", "0.5"),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ];
                let center = (canvas.width() / 2.0, canvas.height() / 2.0);
                match result.envelope {
                    EnvelopeGeometry::Box { .. } => {
                        group.add(svg_util::data_to_path(svg_util::aa_rect_data(canvas), &envelope_style))
                    }
                    EnvelopeGeometry::Circle { radius } => {
                        group.add(svg_util::ellipse(center, (radius, radius), &envelope_style))
                    }
                    EnvelopeGeometry::Ellipse { semi_x, semi_y } => {
                        group.add(svg_util::ellipse(center, (semi_x, semi_y), &envelope_style))
                    }
                }
            }
        }
    };

    //draw bins
    let bins_group = {
        let mut bins_group = Group::new().set("id", "bins");
        let bin_style = [
            ("fill", &*format!("{}", theme.bin_fill)),
            ("stroke-width", &*format!("{}", stroke_width)),
            ("stroke", "black"),
        ];
        let label_size = 0.25 * f64::min(result.bin.width as f64, result.bin.height as f64);
        for (i, rect) in (0..result.n_placed()).filter_map(|i| result.placement_rect(i).map(|r| (i, r))) {
            let mut bin_group = Group::new()
                .set("id", format!("bin_{i}"))
                .add(svg_util::data_to_path(svg_util::aa_rect_data(rect), &bin_style))
                .add(Title::new(format!(
                    "bin {i}, top left: ({}, {})",
                    rect.x_min, rect.y_min
                )));
            if options.bin_labels {
                let centroid = rect.centroid();
                bin_group = bin_group.add(
                    Text::new(format!("{i}"))
                        .set("x", centroid.x())
                        .set("y", centroid.y())
                        .set("font-size", label_size)
                        .set("font-family", "monospace")
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle"),
                );
            }
            bins_group = bins_group.add(bin_group);
        }
        bins_group
    };

    //draw reserve on top
    let reserve_group = {
        let mut reserve_group = Group::new().set("id", "reserve");
        if let (true, Some(reserve)) = (options.reserve, result.reserve.as_ref()) {
            reserve_group = reserve_group
                .add(svg_util::data_to_path(
                    svg_util::aa_rect_data(reserve.rect),
                    &[
                        ("fill", &*format!("{}", theme.reserve_fill)),
                        ("fill-opacity", &*format!("{}", theme.reserve_opac)),
                        ("stroke", &*format!("{}", theme.reserve_fill)),
                        ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                    ],
                ))
                .add(Title::new(format!(
                    "reserve, {}x{} px, {} slots excluded",
                    reserve.spec.width, reserve.spec.height, reserve.excluded_slots
                )));
        }
        reserve_group
    };

    let vbox_margin = 0.05 * min_dim;
    let vbox = (
        canvas.x_min - vbox_margin,
        canvas.y_min - vbox_margin - font_size,
        canvas.width() + 2.0 * vbox_margin,
        canvas.height() + 2.0 * vbox_margin + font_size,
    );

    Document::new()
        .set("viewBox", vbox)
        .add(canvas_group)
        .add(bins_group)
        .add(reserve_group)
        .add(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EnvelopeShape, EnvelopeSpec, ReservePosition, ReserveSpec};
    use crate::pack;

    #[test]
    fn every_bin_is_drawn() {
        let result = pack(10, 10, 12, &EnvelopeShape::Circle.into()).unwrap();
        let doc = result_to_svg(&result, SvgDrawOptions::default(), "circle").to_string();
        assert_eq!(doc.matches("id=\"bin_").count(), 12);
        assert!(doc.contains("<ellipse"));
        assert!(doc.contains("circle"));
    }

    #[test]
    fn reserve_is_drawn_in_theme_color() {
        let spec = EnvelopeSpec::new(EnvelopeShape::Square)
            .with_reserve(ReserveSpec::fixed(15, 15, ReservePosition::TopLeft));
        let result = pack(10, 10, 10, &spec).unwrap();
        let options = SvgDrawOptions::default();
        let doc = result_to_svg(&result, options, "").to_string();
        assert!(doc.contains(&options.theme.reserve_fill.to_string()));

        let hidden = SvgDrawOptions {
            reserve: false,
            ..options
        };
        let doc = result_to_svg(&result, hidden, "").to_string();
        assert!(!doc.contains("slots excluded"));
    }
}
