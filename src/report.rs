use crate::{
    models::{escape_html, nl2br, ErrorEvent},
    trace::TraceRenderer,
};
use bytes::Bytes;
use std::fmt;

/// A finished diagnostic report, ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    html: String,
}

impl Report {
    /// The report document.
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// The report document as bytes.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.html.as_bytes())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Assembles reports from error events.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    renderer: TraceRenderer,
}

impl Composer {
    /// Create a composer rendering traces with `renderer`.
    pub fn new(renderer: TraceRenderer) -> Self {
        Self { renderer }
    }

    /// Compose the report for `event`.
    ///
    /// The apology shown to end users is always included. Only with `verbose` the report also
    /// contains the message, the source location and the back-trace including argument values.
    /// Never enable this for deployments reachable by untrusted users.
    pub fn compose(&self, event: &ErrorEvent, verbose: bool) -> Report {
        let details = if verbose {
            self.details(event)
        } else {
            String::new()
        };
        Report {
            html: format!("{}{}{}", HEAD, details, FOOT),
        }
    }

    fn details(&self, event: &ErrorEvent) -> String {
        let message = nl2br(&escape_html(event.message()));
        format!(
            r#"<h3>{category}:</h3>
<p class="errorMessage">{message}</p>
<table>
  <tr>
    <th colspan="2">{type_name}</th>
  </tr>
  <tr>
    <th>Message:</th>
    <td>{message}</td>
  </tr>
  <tr>
    <th>Code:</th>
    <td>{code}</td>
  </tr>
  <tr>
    <th>File:</th>
    <td>{file}</td>
  </tr>
  <tr>
    <th>Line:</th>
    <td>{line}</td>
  </tr>
</table>
<h3>Back-Trace:</h3>
<p>{trace}</p>
<textarea id="argtext" style="display:none" cols="100" rows="15"></textarea>
<script type="text/javascript">
//<![CDATA[
(function () {{
    var argText = document.getElementById("argtext");
    var values = document.querySelectorAll(".array, .string");
    for (var i = 0; i < values.length; i++) {{
        values[i].addEventListener("click", function () {{
            argText.style.display = "block";
            argText.value = this.getAttribute("title") || this.textContent;
        }});
    }}
}})();
//]]>
</script>
"#,
            category = event.category().label(),
            message = message,
            type_name = escape_html(event.type_name()),
            code = event.code(),
            file = escape_html(event.file()),
            line = event.line(),
            trace = self.renderer.render(event.trace()),
        )
    }
}

const HEAD: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />
<title>Oops! An error occurred...</title>
<style type="text/css">
p {
    font-family: "Courier New", Courier, monospace;
    line-height: 1.8;
}
th {
    text-align: right;
    background-color: #CCCCCC;
}
td {
    padding-left: 2px;
    background-color: #DDDDDD;
}
th[colspan = '2'] {
    font-size: 18px;
    font-weight: bold;
    color: #FFFFFF;
    background-color: #FF3333;
    text-align: center;
    margin: 0;
    padding: 6px;
}
body {
    font-family: Verdana, Arial, Helvetica, sans-serif;
    font-size: 12px;
}
.errorMessage {
    margin: 10px;
    padding: 5px;
    border: solid 2px black;
    color: red;
    font-weight: bold;
}
.function {
    color: #0000FF;
}
.string {
    color: #008200;
}
.number {
    color: #FF0000;
}
.comment {
    color: #808080;
}
.string:hover, .array:hover {
    text-decoration: underline;
    cursor: pointer;
}
.keyword {
    color: #0000FF;
}
</style>
</head>

<body>
<h1>Oops!</h1>
<h2>An error occurred!</h2>
<p>A critical error occurred while executing the server's code. In general this is not your fault but the server's.</p>
<p>You should try again later. The administrator has been informed about this error.</p>
"#;

const FOOT: &str = "</body>\n</html>\n";
