use super::{Camera, ClearColor, Node, Scene, SceneError};

pub(crate) fn parse(source: &str, default_name: &str) -> Result<Scene, SceneError> {
    let mut scene = Scene::empty(default_name);

    for (i, raw) in source.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (directive, rest) = match line.split_once(char::is_whitespace) {
            Some((d, r)) => (d, r.trim()),
            None => (line, ""),
        };

        match directive {
            "name" => {
                if rest.is_empty() {
                    return Err(SceneError::parse(line_no, "`name` needs a value"));
                }
                scene.name = rest.to_string();
            }
            "clear" => scene.clear_color = parse_clear(rest, line_no)?,
            "camera" => scene.camera = parse_camera(rest, line_no)?,
            "node" => {
                let node = parse_node(rest, line_no, &scene)?;
                scene.nodes.push(node);
            }
            other => {
                return Err(SceneError::parse(
                    line_no,
                    format!("unknown directive `{other}`"),
                ));
            }
        }
    }

    Ok(scene)
}

fn numbers(rest: &str, line: usize) -> Result<Vec<f32>, SceneError> {
    rest.split_whitespace()
        .map(|tok| {
            tok.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SceneError::parse(line, format!("`{tok}` is not a number")))
        })
        .collect()
}

fn parse_clear(rest: &str, line: usize) -> Result<ClearColor, SceneError> {
    let v = numbers(rest, line)?;
    let (r, g, b, a) = match v.as_slice() {
        [r, g, b] => (*r, *g, *b, 1.0),
        [r, g, b, a] => (*r, *g, *b, *a),
        _ => return Err(SceneError::parse(line, "`clear` takes 3 or 4 components")),
    };

    if [r, g, b, a].iter().any(|c| !(0.0..=1.0).contains(c)) {
        return Err(SceneError::parse(line, "color components must be within [0, 1]"));
    }

    Ok(ClearColor { r, g, b, a })
}

fn parse_camera(rest: &str, line: usize) -> Result<Camera, SceneError> {
    let v = numbers(rest, line)?;
    let [fov, near, far] = v.as_slice() else {
        return Err(SceneError::parse(line, "`camera` takes <fov> <near> <far>"));
    };

    if !(*fov > 0.0 && *fov < 180.0) {
        return Err(SceneError::parse(line, "field of view must be in (0, 180)"));
    }
    if !(*near > 0.0 && *near < *far) {
        return Err(SceneError::parse(line, "clip planes need 0 < near < far"));
    }

    Ok(Camera {
        fov: *fov,
        near: *near,
        far: *far,
    })
}

fn parse_node(
    rest: &str,
    line: usize,
    scene: &Scene,
) -> Result<Node, SceneError> {
    let mut parts = rest.split_whitespace();
    let Some(name) = parts.next() else {
        return Err(SceneError::parse(line, "`node` needs a name"));
    };
    let parent = parts.next();
    if parts.next().is_some() {
        return Err(SceneError::parse(line, "`node` takes <name> [parent]"));
    }

    if scene.find(name).is_some() {
        return Err(SceneError::parse(line, format!("duplicate node `{name}`")));
    }

    let parent = match parent {
        None => None,
        Some(p) => match scene.find(p) {
            Some(i) => Some(i),
            None => {
                return Err(SceneError::parse(
                    line,
                    format!("parent `{p}` is not declared before `{name}`"),
                ));
            }
        },
    };

    Ok(Node {
        name: name.to_string(),
        parent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(src: &str) -> Scene {
        parse(src, "test").unwrap()
    }

    fn err_line(src: &str) -> usize {
        match parse(src, "test").unwrap_err() {
            SceneError::Parse { line, .. } => line,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_source_is_default_scene() {
        let scene = ok("");
        assert_eq!(scene.name(), "test");
        assert_eq!(scene.clear_color(), ClearColor::BLACK);
        assert_eq!(scene.camera(), Camera::default());
        assert!(scene.nodes().is_empty());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let scene = ok("# header\n\n   # indented\nname main\n");
        assert_eq!(scene.name(), "main");
    }

    #[test]
    fn name_keeps_inner_spaces() {
        assert_eq!(ok("name  Main Menu ").name(), "Main Menu");
    }

    #[test]
    fn clear_alpha_defaults_to_one() {
        let c = ok("clear 0.1 0.2 0.3").clear_color();
        assert_eq!(c, ClearColor { r: 0.1, g: 0.2, b: 0.3, a: 1.0 });
    }

    #[test]
    fn clear_out_of_range_is_rejected() {
        assert_eq!(err_line("name a\nclear 0 0 2"), 2);
    }

    #[test]
    fn clear_wrong_arity_is_rejected() {
        assert_eq!(err_line("clear 0 0"), 1);
    }

    #[test]
    fn camera_is_validated() {
        assert_eq!(ok("camera 45 0.1 100").camera().fov, 45.0);
        assert_eq!(err_line("camera 180 1 10"), 1);
        assert_eq!(err_line("camera 60 10 1"), 1);
        assert_eq!(err_line("camera 60 nan 1"), 1);
    }

    #[test]
    fn nodes_link_to_earlier_parents() {
        let scene = ok("node root\nnode camera root\nnode light root");
        assert_eq!(scene.nodes()[1].parent, Some(0));
        assert_eq!(scene.find("light"), Some(2));
    }

    #[test]
    fn forward_parent_reference_is_rejected() {
        assert_eq!(err_line("node child root\nnode root"), 1);
    }

    #[test]
    fn duplicate_node_is_rejected() {
        assert_eq!(err_line("node a\nnode a"), 2);
    }

    #[test]
    fn unknown_directive_reports_line() {
        assert_eq!(err_line("name a\n\nmesh cube"), 3);
    }

    #[test]
    fn traversal_is_pre_order() {
        let scene = ok("node a\nnode b\nnode a1 a\nnode a2 a\nnode a1x a1\nnode b1 b");
        let mut seen = Vec::new();
        scene.traverse_depth_first(|n, depth| seen.push((n.name.clone(), depth)));
        let expected = [("a", 0), ("a1", 1), ("a1x", 2), ("a2", 1), ("b", 0), ("b1", 1)];
        let expected: Vec<_> = expected.iter().map(|(n, d)| (n.to_string(), *d)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Scene::load(std::path::Path::new("does/not/exist.txt")).unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }
}
