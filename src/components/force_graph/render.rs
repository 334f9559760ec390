use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.theme.page_background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_hover_card(state, ctx);
}

/// Card beside the hovered artist, drawn in screen space so zoom never
/// shrinks the text.
fn draw_hover_card(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);
	let Some((gx, gy, lines)) = state.hover_card().filter(|_| t > 0.01) else {
		return;
	};
	let theme = &state.theme;
	let (line_height, pad) = (16.0, 8.0);

	ctx.set_font("bold 13px sans-serif");
	let text_width = lines
		.iter()
		.filter_map(|line| ctx.measure_text(line).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let (w, h) = (text_width + 2.0 * pad, lines.len() as f64 * line_height + pad);

	// right of the node, pulled back inside the canvas
	let x = (gx * state.transform.k + state.transform.x + 14.0).min(state.width - w - 4.0).max(4.0);
	let y = (gy * state.transform.k + state.transform.y - h / 2.0).min(state.height - h - 4.0).max(4.0);

	ctx.set_global_alpha(0.95 * t);
	ctx.set_fill_style_str(&theme.page_background);
	ctx.fill_rect(x, y, w, h);
	ctx.set_stroke_style_str(&theme.edge_highlight);
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, w, h);

	ctx.set_fill_style_str(&theme.label_color);
	for (i, line) in lines.iter().enumerate() {
		if i == 0 {
			ctx.set_font("bold 13px sans-serif");
		} else if i == 1 {
			ctx.set_font("13px sans-serif");
		}
		let _ = ctx.fill_text(line, x + pad, y + pad / 2.0 + (i as f64 + 0.8) * line_height);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let line_width = 1.0 / k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let theme = &state.theme;

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: every edge at 0.8; t=1: highlighted edges opaque, the rest faded
		let (alpha, width, color) = if is_highlighted {
			(
				0.8 + 0.2 * t,
				line_width * (1.0 + 2.0 * t),
				if t > 0.5 { &theme.edge_highlight } else { &theme.edge_color },
			)
		} else {
			(0.8 - 0.6 * t, line_width, &theme.edge_color)
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_label(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64) {
	ctx.set_fill_style_str(&state.theme.label_color);
	ctx.set_font(&format!("{}px sans-serif", 12.0 / state.transform.k.max(0.5)));
	let _ = ctx.fill_text(label, x, y);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, info.radius * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		draw_label(state, ctx, &info.label, x + radius + 3.0, y + 4.0);
		ctx.set_global_alpha(1.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(info.radius * (1.0 + 0.35 * t), info.radius * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(info.radius * (1.0 + 0.2 * t), info.radius * (1.4 + 0.6 * t))
		} else {
			(info.radius, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_global_alpha(0.7 * t);
			ctx.set_stroke_style_str(&state.theme.edge_highlight);
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
			ctx.set_global_alpha(1.0);
		}

		draw_label(state, ctx, &info.label, x + radius + 3.0, y + 4.0);
	});
}
