pub const FULL_MARKUP: &str = r#"
<code-change>
    <summary>
        [Brief overview of all changes being made]
    </summary>

    <files-to-change>
        <file name="path/to/file1.ext" />
        <file name="path/to/file2.ext" />
        <file name="path/to/file3.ext" />
    </files-to-change>

    <changes>
        <change file-name="path/to/file1.ext">
            <modify start-line="10" end-line="15">
                [replacement code for lines 10-15]
            </modify>
            <add>
                [new code to append to file]
            </add>
        </change>

        <change file-name="path/to/file2.ext">
            <add>
                [complete new file content]
            </add>
        </change>

        <change file-name="path/to/file3.ext">
            <delete />
        </change>
    </changes>

    <additional-steps>
        <step>npm install new-package</step>
        <step>Update configuration file</step>
    </additional-steps>

    <verification>
        <step>Run tests to verify login functionality</step>
        <step>Check database connections are pooled</step>
    </verification>
</code-change>
"#;

pub fn operation(error: &changecraft::ParserError) -> Option<&str> {
    error.context_value("operation").and_then(serde_json::Value::as_str)
}
