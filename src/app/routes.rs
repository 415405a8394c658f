use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Cow;
use std::fmt;

/// Characters escaped when an id is placed back into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Services,
    Blog,
    BlogPost { id: String },
    Contact,
    Appointment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(Route),
    /// Unknown paths are replaced with this route.
    Redirect(Route),
}

impl Resolution {
    pub fn route(&self) -> &Route {
        match self {
            Self::Page(route) | Self::Redirect(route) => route,
        }
    }
}

impl Route {
    /// Maps a URL path to a page. Query strings, fragments and trailing
    /// slashes are ignored and fixed segments match in any ASCII case. The
    /// article id is percent-decoded but otherwise kept as typed. Anything
    /// unmatched redirects home.
    pub fn resolve(path: &str) -> Resolution {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Some(Self::Home),
            [page] => Self::page(page),
            [blog, id] if blog.eq_ignore_ascii_case("blog") => Some(Self::BlogPost {
                id: decode_segment(id).into_owned(),
            }),
            _ => None,
        };

        match route {
            Some(route) => Resolution::Page(route),
            None => {
                tracing::debug!("No route for {}, redirecting home", path);
                Resolution::Redirect(Self::Home)
            }
        }
    }

    fn page(segment: &str) -> Option<Self> {
        match segment.to_ascii_lowercase().as_str() {
            "about" => Some(Self::About),
            "services" => Some(Self::Services),
            "blog" => Some(Self::Blog),
            "contact" => Some(Self::Contact),
            "appointment" => Some(Self::Appointment),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::About => "/about".to_string(),
            Self::Services => "/services".to_string(),
            Self::Blog => "/blog".to_string(),
            Self::BlogPost { id } => format!("/blog/{}", utf8_percent_encode(id, SEGMENT)),
            Self::Contact => "/contact".to_string(),
            Self::Appointment => "/appointment".to_string(),
        }
    }
}

/// Malformed escapes leave the segment as typed.
fn decode_segment(segment: &str) -> Cow<'_, str> {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Could not decode path segment {}: {}", segment, e);
            Cow::Borrowed(segment)
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        assert_eq!(Route::resolve("/"), Resolution::Page(Route::Home));
        assert_eq!(Route::resolve(""), Resolution::Page(Route::Home));
        assert_eq!(Route::resolve("/about"), Resolution::Page(Route::About));
        assert_eq!(Route::resolve("/services/"), Resolution::Page(Route::Services));
        assert_eq!(Route::resolve("/blog?page=2"), Resolution::Page(Route::Blog));
        assert_eq!(Route::resolve("/contact#form"), Resolution::Page(Route::Contact));
        assert_eq!(Route::resolve("/appointment"), Resolution::Page(Route::Appointment));
        assert_eq!(Route::resolve("/About"), Resolution::Page(Route::About));
        assert_eq!(Route::resolve("/BLOG/"), Resolution::Page(Route::Blog));
        assert_eq!(
            Route::resolve("/blog/abc-123"),
            Resolution::Page(Route::BlogPost {
                id: "abc-123".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_paths_redirect_home() {
        for path in ["/pricing", "/blog/a/b", "/abouts"] {
            let resolution = Route::resolve(path);
            assert_eq!(resolution, Resolution::Redirect(Route::Home), "{}", path);
            assert_eq!(resolution.route(), &Route::Home);
        }
    }

    #[test]
    fn test_article_id_is_decoded_and_keeps_case() {
        assert_eq!(
            Route::resolve("/Blog/a%20b"),
            Resolution::Page(Route::BlogPost {
                id: "a b".to_string()
            })
        );
        assert_eq!(
            Route::resolve("/blog/AbC-123"),
            Resolution::Page(Route::BlogPost {
                id: "AbC-123".to_string()
            })
        );
        // invalid UTF-8 after decoding
        assert_eq!(
            Route::resolve("/blog/%FF"),
            Resolution::Page(Route::BlogPost {
                id: "%FF".to_string()
            })
        );
    }

    #[test]
    fn test_paths_round_trip() {
        let routes = [
            Route::Home,
            Route::Blog,
            Route::BlogPost { id: "x".to_string() },
            Route::BlogPost {
                id: "a b/50%".to_string(),
            },
            Route::Appointment,
        ];
        for route in routes {
            assert_eq!(Route::resolve(&route.path()), Resolution::Page(route));
        }
    }
}
