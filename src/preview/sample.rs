/// Document shown in the editor at startup.
pub const SAMPLE_DOCUMENT: &str = r#"
  # Markdown Previewer
  --------------------

  # This is an H1 header

  ## This is an H2 header

  A link example:
  [Facebook](http://facebook.com/).

  This is an example of inline `code` .

      This is a code block.

  * List item

  >This is a block quote.

  ![Cadillac Escalade image](https://assets.gm.com/cadillac/2020/escalade-colorizer/static/media/06-6C15706-1SA-GBA.5e8a830b.png "Cadillac Escalade.")

  __Bolded text__
"#;
